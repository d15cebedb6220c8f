pub mod exports;
pub mod help;
pub mod heritage;
pub mod page;
pub mod rugs;
pub mod status;
pub mod tabs;
