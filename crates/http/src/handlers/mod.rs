pub mod kpi;
pub mod phase1;
pub mod phase3;
pub mod users;
