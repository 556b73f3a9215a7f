use std::ffi::OsStr;

use clap::CommandFactory;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("relatedbar").chain(args.iter().copied())).unwrap()
}

#[test]
fn connection_flags_read_the_environment() {
    let command = Cli::command();
    let env_of = |id: &str| {
        command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_env())
            .map(OsStr::to_os_string)
    };
    assert_eq!(env_of("base_url"), Some("RELATEDBAR_BASE_URL".into()));
    assert_eq!(env_of("api_key"), Some("RELATEDBAR_API_KEY".into()));
}

#[test]
fn flags_override_config() {
    let cli = parse(&["--base-url", "http://bi.local/", "--api-key", "k"]);
    let config = cli.config(RelatedbarConfig::default());
    assert_eq!(config.base_url, "http://bi.local");
    assert_eq!(config.api_key.as_deref(), Some("k"));
}

#[test]
fn options_mirror_flags() {
    let cli = parse(&["--tag", "ops", "--tag", "kpi", "--dashboard-id", "7", "--no-queries", "--edit-links"]);
    let options = cli.options();
    assert_eq!(options.tags, vec!["ops".to_owned(), "kpi".to_owned()]);
    assert_eq!(options.fetch_tags_from_dashboard_id, Some(ItemId::from(7)));
    assert!(options.show_dashboards);
    assert!(!options.show_queries);
    assert_eq!(options.query_link_mode, QueryLinkMode::Edit);
}
