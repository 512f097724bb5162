pub mod blog_service;
