pub mod check_server;
