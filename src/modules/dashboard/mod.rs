pub mod admin_client;
pub mod columns;
pub mod forms;

pub use admin_client::AdminClient;
pub use columns::{ColumnDef, TableRow};
pub use forms::{EntityForm, FormError, FormMode, FormOutcome, Toast, ToastKind};
