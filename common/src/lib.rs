//! Equipment Visualizer Common Library
//!
//! CLIとWeb(WASM)で共有されるワークフローと型

pub mod types;
pub mod config;
pub mod error;
pub mod format;
pub mod projector;
pub mod state;
pub mod transport;
pub mod workflow;

pub use types::{
    CsvFile, EquipmentSummary, HistorySnapshot, RecordId, TypeDistribution, UploadRecord,
    UploadResponse, parse_history, parse_upload_response,
};
pub use config::{ApiConfig, AuthProvider, ClientConfig, Credentials, StaticAuth};
pub use error::{Error, Result, SaveError, TransportError, ValidationError, WorkflowError};
pub use projector::{ChartSeries, Dataset, project};
pub use state::{OperationKind, OperationStatus, Ticket, UploadOutcome, WorkflowState};
pub use transport::{ReportSaver, Transport};
pub use workflow::Workflow;
