pub mod jwt_helper;
pub mod test_server;
