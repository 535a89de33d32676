//! Export handlers.

mod export_round_one;
mod export_round_two;

pub use export_round_one::{ExportRoundOneHandler, ExportRoundOneQuery};
pub use export_round_two::{ExportRoundTwoHandler, ExportRoundTwoQuery, Round2ExportVariant};
