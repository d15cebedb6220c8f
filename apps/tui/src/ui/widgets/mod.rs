pub mod arc_chart;
pub mod charts;
pub mod chips;
pub mod popup;
pub mod tables;
