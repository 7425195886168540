pub mod errors;
pub mod storage;
pub mod stores;
pub mod validator;
