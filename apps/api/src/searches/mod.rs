// Saved searches: create/read of user job queries together with their parsed form.

pub mod handlers;
pub mod store;
