pub mod short_code;
pub mod shortener;

pub use short_code::ShortCodeGenerator;
pub use shortener::ShortenerService;
