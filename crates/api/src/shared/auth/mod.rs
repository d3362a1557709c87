mod route_guards;

pub use route_guards::{protect_producer_route, protect_route, session_from_token, Claims};

use beacon_domain::ID;

/// The authenticated user a request is made on behalf of. Passed explicitly
/// into every use case that acts for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub owner_id: ID,
}
