//! Infrastructure implementation of the `DeviceFarmApi` port on top of
//! `aws-sdk-devicefarm`.
//!
//! Listing calls follow `nextToken` until exhausted; every other call is a
//! single request. SDK errors are rendered with their full context.

use anyhow::{Context, Result, anyhow};
use aws_sdk_devicefarm::Client;
use aws_sdk_devicefarm::config::{BehaviorVersion, Credentials as SdkCredentials, Region};
use aws_sdk_devicefarm::error::DisplayErrorContext;
use aws_sdk_devicefarm::types as sdk;

use crate::application::ports::{ARTIFACT_CONTENT_TYPE, DeviceFarmApi};
use crate::domain::arn::DEVICE_FARM_REGION;
use crate::domain::{
    Device, DevicePlatform, PoolRule, RemotePool, RunRequest, TestType, UploadKind, UploadSlot,
    UploadStatus,
};
use crate::infra::credentials::Credentials;

const PROVIDER_NAME: &str = "devicefarm-cli";

/// Production Device Farm client. Device Farm only exists in `us-west-2`.
pub struct AwsDeviceFarm {
    client: Client,
}

impl AwsDeviceFarm {
    #[must_use]
    pub fn new(credentials: &Credentials) -> Self {
        let config = aws_sdk_devicefarm::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(DEVICE_FARM_REGION))
            .credentials_provider(SdkCredentials::new(
                credentials.access_key.clone(),
                credentials.secret.clone(),
                None,
                None,
                PROVIDER_NAME,
            ))
            .build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

fn sdk_error<E: std::error::Error>(e: E) -> anyhow::Error {
    anyhow!("{}", DisplayErrorContext(e))
}

// ── Conversions ───────────────────────────────────────────────────────────────

fn to_device(device: &sdk::Device) -> Option<Device> {
    let platform = match device.platform() {
        Some(sdk::DevicePlatform::Android) => DevicePlatform::Android,
        Some(sdk::DevicePlatform::Ios) => DevicePlatform::Ios,
        _ => DevicePlatform::Other,
    };
    Some(Device {
        name: device.name()?.to_string(),
        platform,
        arn: device.arn()?.to_string(),
    })
}

fn to_rule(rule: &sdk::Rule) -> PoolRule {
    PoolRule {
        attribute: rule.attribute().map(|a| a.as_str().to_string()).unwrap_or_default(),
        operator: rule.operator().map(|o| o.as_str().to_string()).unwrap_or_default(),
        value: rule.value().unwrap_or_default().to_string(),
    }
}

fn from_rule(rule: &PoolRule) -> sdk::Rule {
    sdk::Rule::builder()
        .attribute(sdk::DeviceAttribute::from(rule.attribute.as_str()))
        .operator(sdk::RuleOperator::from(rule.operator.as_str()))
        .value(rule.value.clone())
        .build()
}

fn to_pool(pool: &sdk::DevicePool) -> Result<RemotePool> {
    Ok(RemotePool {
        arn: pool.arn().context("device pool without ARN")?.to_string(),
        name: pool.name().unwrap_or_default().to_string(),
        rules: pool.rules().iter().map(to_rule).collect(),
    })
}

fn upload_type(kind: UploadKind) -> sdk::UploadType {
    match kind {
        UploadKind::AndroidApp => sdk::UploadType::AndroidApp,
        UploadKind::InstrumentationTestPackage => sdk::UploadType::InstrumentationTestPackage,
        UploadKind::AppiumPythonTestPackage => sdk::UploadType::AppiumPythonTestPackage,
    }
}

fn to_status(status: Option<&sdk::UploadStatus>) -> UploadStatus {
    match status {
        Some(sdk::UploadStatus::Succeeded) => UploadStatus::Succeeded,
        Some(sdk::UploadStatus::Failed) => UploadStatus::Failed,
        Some(sdk::UploadStatus::Initialized) => UploadStatus::Initialized,
        Some(sdk::UploadStatus::Processing) => UploadStatus::Processing,
        other => {
            tracing::warn!(status = ?other, "unrecognised upload status, treating as processing");
            UploadStatus::Processing
        }
    }
}

fn test_type(test_type: TestType) -> sdk::TestType {
    match test_type {
        TestType::Instrumentation => sdk::TestType::Instrumentation,
        TestType::AppiumPython => sdk::TestType::AppiumPython,
    }
}

// ── Port implementation ───────────────────────────────────────────────────────

impl DeviceFarmApi for AwsDeviceFarm {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        let mut devices = Vec::new();
        let mut next_token = None;
        loop {
            let page = self
                .client
                .list_devices()
                .set_next_token(next_token)
                .send()
                .await
                .map_err(sdk_error)?;
            devices.extend(page.devices().iter().filter_map(to_device));
            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                return Ok(devices);
            }
        }
    }

    async fn list_device_pools(&self, project_arn: &str) -> Result<Vec<RemotePool>> {
        let mut pools = Vec::new();
        let mut next_token = None;
        loop {
            let page = self
                .client
                .list_device_pools()
                .arn(project_arn)
                .set_next_token(next_token)
                .send()
                .await
                .map_err(sdk_error)?;
            for pool in page.device_pools() {
                pools.push(to_pool(pool)?);
            }
            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                return Ok(pools);
            }
        }
    }

    async fn create_device_pool(
        &self,
        project_arn: &str,
        name: &str,
        rule: &PoolRule,
    ) -> Result<RemotePool> {
        let output = self
            .client
            .create_device_pool()
            .project_arn(project_arn)
            .name(name)
            .rules(from_rule(rule))
            .send()
            .await
            .map_err(sdk_error)?;
        to_pool(output.device_pool().context("create returned no device pool")?)
    }

    async fn update_device_pool(
        &self,
        pool_arn: &str,
        name: &str,
        rule: &PoolRule,
    ) -> Result<RemotePool> {
        let output = self
            .client
            .update_device_pool()
            .arn(pool_arn)
            .name(name)
            .rules(from_rule(rule))
            .send()
            .await
            .map_err(sdk_error)?;
        to_pool(output.device_pool().context("update returned no device pool")?)
    }

    async fn create_upload(
        &self,
        project_arn: &str,
        name: &str,
        kind: UploadKind,
    ) -> Result<UploadSlot> {
        let output = self
            .client
            .create_upload()
            .project_arn(project_arn)
            .name(name)
            .r#type(upload_type(kind))
            .content_type(ARTIFACT_CONTENT_TYPE)
            .send()
            .await
            .map_err(sdk_error)?;
        let upload = output.upload().context("create returned no upload")?;
        Ok(UploadSlot {
            arn: upload.arn().context("upload without ARN")?.to_string(),
            url: upload.url().context("upload without URL")?.to_string(),
        })
    }

    async fn get_upload(&self, upload_arn: &str) -> Result<UploadStatus> {
        let output = self
            .client
            .get_upload()
            .arn(upload_arn)
            .send()
            .await
            .map_err(sdk_error)?;
        let upload = output.upload().context("get returned no upload")?;
        Ok(to_status(upload.status()))
    }

    async fn schedule_run(&self, request: &RunRequest) -> Result<String> {
        let test = sdk::ScheduleRunTest::builder()
            .r#type(test_type(request.test_type))
            .test_package_arn(&request.test_package_arn)
            .build()
            .context("building run test")?;
        let output = self
            .client
            .schedule_run()
            .project_arn(&request.project_arn)
            .app_arn(&request.app_arn)
            .device_pool_arn(&request.device_pool_arn)
            .test(test)
            .send()
            .await
            .map_err(sdk_error)?;
        let run = output.run().context("schedule returned no run")?;
        Ok(run.arn().context("run without ARN")?.to_string())
    }
}
