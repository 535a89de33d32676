//! Round progression handlers.

mod calculate_round_one;
mod calculate_round_two;
mod get_round_status;
mod setup_round_two;

pub use calculate_round_one::{CalculateRoundOneCommand, CalculateRoundOneHandler};
pub use calculate_round_two::{CalculateRoundTwoCommand, CalculateRoundTwoHandler};
pub use get_round_status::{GetRoundStatusHandler, GetRoundStatusQuery, RoundStatus};
pub use setup_round_two::{AllocationSummary, SetupRoundTwoCommand, SetupRoundTwoHandler};

use crate::domain::foundation::CommandMetadata;
use crate::domain::progression::ProgressionError;
use crate::ports::IdentityProvider;

/// Round transitions are admin-triggered; everyone else is turned away.
pub(crate) async fn require_admin(
    identity: &dyn IdentityProvider,
    metadata: &CommandMetadata,
) -> Result<(), ProgressionError> {
    let resolved = identity
        .resolve(&metadata.actor_id)
        .await?
        .ok_or(ProgressionError::Forbidden)?;
    if !resolved.is_admin() {
        return Err(ProgressionError::Forbidden);
    }
    Ok(())
}
