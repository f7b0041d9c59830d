pub mod attendance;
pub mod department_rule;
pub mod role;
