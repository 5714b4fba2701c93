pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::ClinicDb;
pub use memory::MemoryStore;
pub use metrics::{get_metrics, init_metrics, record_write};
pub use store::{MongoStore, RecordStore, SharedStore};
