pub(crate) mod formatting;
pub(crate) mod url;
