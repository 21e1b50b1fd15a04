//! Unit tests for the cached device catalog.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use devicefarm_cli::application::services::device_catalog::DeviceCatalog;
use devicefarm_cli::domain::{DevicePlatform, DeviceQuery};

use crate::helpers::device;
use crate::mocks::FakeDeviceFarm;

fn farm() -> FakeDeviceFarm {
    FakeDeviceFarm::with_devices(vec![
        device("Samsung Galaxy S3", DevicePlatform::Android, "device:S3"),
        device("Apple iPhone 6S", DevicePlatform::Ios, "device:6S"),
        device("Google Pixel 5", DevicePlatform::Android, "device:P5"),
    ])
}

#[tokio::test]
async fn test_catalog_lists_devices_once() {
    let api = farm();
    let catalog = DeviceCatalog::new(&api);
    assert_eq!(catalog.all_devices().await.expect("devices").len(), 3);
    catalog
        .search(&DeviceQuery::default())
        .await
        .expect("search");
    assert_eq!(api.count("list_devices"), 1);
}

#[tokio::test]
async fn test_catalog_does_not_cache_failures() {
    let api = farm();
    *api.list_devices_failures.lock().unwrap() = 1;
    let catalog = DeviceCatalog::new(&api);
    assert!(catalog.all_devices().await.is_err());
    assert_eq!(catalog.all_devices().await.expect("retry").len(), 3);
    catalog.all_devices().await.expect("cached");
    assert_eq!(api.count("list_devices"), 2);
}

#[tokio::test]
async fn test_catalog_search_filters_and_sorts() {
    let api = farm();
    let catalog = DeviceCatalog::new(&api);
    let query = DeviceQuery {
        search: "L".into(),
        platform: Some(DevicePlatform::Android),
    };
    let names: Vec<String> = catalog
        .search(&query)
        .await
        .expect("search")
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["Google Pixel 5", "Samsung Galaxy S3"]);
}
