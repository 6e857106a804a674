/// Identity of the operator performing mutations, injected explicitly so
/// operations that need audit fields never read ambient global state.
#[derive(Clone, Debug)]
pub struct CurrentUserContext {
    pub actor_id: i64,
}

impl CurrentUserContext {
    pub fn new(actor_id: i64) -> CurrentUserContext {
        CurrentUserContext { actor_id }
    }
}
