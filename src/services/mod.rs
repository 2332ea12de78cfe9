pub mod image_url_service;
