pub mod dependencies;
pub mod eligibility;
pub mod match_systems;
pub mod scheduling;
pub mod seasons;
pub mod tree;
pub mod validation;

pub use dependencies::DependencyGuard;
pub use eligibility::{EligibilityResolver, TeamSide};
pub use match_systems::MatchSystemCatalog;
pub use scheduling::{SchedulingGuard, WriteMode};
pub use seasons::SeasonService;
pub use tree::CompetitionTree;
pub use validation::LeagueValidator;
