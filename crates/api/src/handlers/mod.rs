pub mod domains;
pub mod logo;
pub mod public;
pub mod qr_codes;
pub mod scannability;
pub mod style;
pub mod tenant;
