pub mod frcm;
pub mod functions;
