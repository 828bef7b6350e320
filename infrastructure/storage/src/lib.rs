mod local_scan_storage;

pub use local_scan_storage::LocalScanStorage;
