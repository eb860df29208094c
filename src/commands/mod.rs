mod context;

pub mod check;
pub mod init;
pub mod rules;
pub mod upgrade;

pub use check::{run_check, run_check_impl, run_hook, run_hook_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use rules::{format_rules, run_rules};
pub use upgrade::{run_upgrade, run_upgrade_impl};
