//! Unit tests for scheduling a run.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use devicefarm_cli::application::services::test_run::{ScheduleRequest, schedule_run};
use devicefarm_cli::application::services::upload::WaitPolicy;
use devicefarm_cli::domain::{RunRequest, TestSpec, TestType, UploadError, UploadStatus};

use crate::helpers::PROJECT_ARN;
use crate::mocks::{FakeDeviceFarm, NoopReporter, RecordingTransfer};

const POLICY: WaitPolicy = WaitPolicy {
    timeout: Duration::from_secs(60),
    delay: Duration::from_secs(5),
};

fn write_artifacts(dir: &Path) {
    std::fs::write(dir.join("app.apk"), b"app").expect("write app");
    std::fs::write(dir.join("tests.apk"), b"tests").expect("write tests");
}

fn request<'a>(test: &'a TestSpec, base_dir: &'a Path) -> ScheduleRequest<'a> {
    ScheduleRequest {
        project_arn: PROJECT_ARN,
        device_pool_arn: "arn:pool:master/all",
        test,
        base_dir,
        policy: POLICY,
    }
}

#[tokio::test(start_paused = true)]
async fn test_schedule_run_uploads_waits_and_schedules() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_artifacts(dir.path());
    let api = FakeDeviceFarm::default();
    api.script("arn:upload:1", &[UploadStatus::Processing, UploadStatus::Succeeded]);
    let transfer = RecordingTransfer::default();
    let test = TestSpec::Instrumentation {
        app: PathBuf::from("app.apk"),
        test_package: PathBuf::from("tests.apk"),
    };

    let run_arn = schedule_run(&api, &transfer, &NoopReporter, request(&test, dir.path()))
        .await
        .expect("schedule");

    assert_eq!(run_arn, "arn:run:1");
    assert_eq!(
        api.calls(),
        [
            "create_upload ANDROID_APP app.apk",
            "create_upload INSTRUMENTATION_TEST_PACKAGE instrumentation.apk",
            "get_upload arn:upload:1",
            "get_upload arn:upload:2",
            "get_upload arn:upload:1",
            "schedule_run",
        ]
    );
    assert_eq!(transfer.puts.lock().unwrap().len(), 2);
    assert_eq!(
        api.runs.lock().unwrap().clone(),
        [RunRequest {
            project_arn: PROJECT_ARN.into(),
            device_pool_arn: "arn:pool:master/all".into(),
            app_arn: "arn:upload:1".into(),
            test_type: TestType::Instrumentation,
            test_package_arn: "arn:upload:2".into(),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_schedule_run_appium_uses_zip_package() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_artifacts(dir.path());
    let api = FakeDeviceFarm::default();
    let test = TestSpec::AppiumPython {
        app: PathBuf::from("app.apk"),
        test_package: PathBuf::from("tests.apk"),
    };
    schedule_run(
        &api,
        &RecordingTransfer::default(),
        &NoopReporter,
        request(&test, dir.path()),
    )
    .await
    .expect("schedule");
    assert!(
        api.calls()
            .contains(&"create_upload APPIUM_PYTHON_TEST_PACKAGE tests.zip".to_string())
    );
    assert_eq!(api.runs.lock().unwrap()[0].test_type, TestType::AppiumPython);
}

#[tokio::test(start_paused = true)]
async fn test_schedule_run_failed_upload_never_schedules() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_artifacts(dir.path());
    let api = FakeDeviceFarm::default();
    api.script("arn:upload:2", &[UploadStatus::Failed]);
    let test = TestSpec::Instrumentation {
        app: PathBuf::from("app.apk"),
        test_package: PathBuf::from("tests.apk"),
    };
    let err = schedule_run(
        &api,
        &RecordingTransfer::default(),
        &NoopReporter,
        request(&test, dir.path()),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<UploadError>(),
        Some(UploadError::Failed { arn }) if arn == "arn:upload:2"
    ));
    assert_eq!(api.count("schedule_run"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_schedule_run_remote_error_reaches_caller() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_artifacts(dir.path());
    let api = FakeDeviceFarm::default();
    api.fail_on("schedule_run");
    let test = TestSpec::Instrumentation {
        app: PathBuf::from("app.apk"),
        test_package: PathBuf::from("tests.apk"),
    };
    let err = schedule_run(
        &api,
        &RecordingTransfer::default(),
        &NoopReporter,
        request(&test, dir.path()),
    )
    .await
    .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("scheduling run"), "got: {message}");
    assert!(message.contains("ServiceUnavailableException"), "got: {message}");
    assert!(api.runs.lock().unwrap().is_empty());
    assert_eq!(api.count("schedule_run"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_schedule_run_upload_error_stops_before_package() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_artifacts(dir.path());
    let api = FakeDeviceFarm::default();
    api.fail_on("create_upload");
    let transfer = RecordingTransfer::default();
    let test = TestSpec::Instrumentation {
        app: PathBuf::from("app.apk"),
        test_package: PathBuf::from("tests.apk"),
    };
    schedule_run(&api, &transfer, &NoopReporter, request(&test, dir.path()))
        .await
        .unwrap_err();
    assert_eq!(api.calls(), ["create_upload ANDROID_APP app.apk"]);
    assert!(transfer.puts.lock().unwrap().is_empty());
}
