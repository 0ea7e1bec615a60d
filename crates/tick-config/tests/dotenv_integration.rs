//! `.env` loading before the figment chain is built.

use figment::Jail;
use pretty_assertions::assert_eq;
use tick_config::TicklerConfig;

#[test]
fn dotenv_file_values_reach_config() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "TICKLER_GENERAL__DEFAULT_OWNER=usr-0badcafe\n")?;

        let config = TicklerConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.general.default_owner, "usr-0badcafe");
        Ok(())
    });
}
