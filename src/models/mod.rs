pub(crate) mod identity;
pub(crate) mod ipc;
pub(crate) mod location;
pub(crate) mod notification;
pub(crate) mod topic;
