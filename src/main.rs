//! `admin-console`: command-line front end for the admin backend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Map, Value};
use tokio::sync::watch;

use admin_console_client::config::load_config;
use admin_console_client::models::auth::LoginRequest;
use admin_console_client::observability::logging::init_logging;
use admin_console_client::session::{FileCredentialStore, TerminalNavigator, TerminalNotifier};
use admin_console_client::table::{EndpointTable, TableColumn, TableController, Viewport};
use admin_console_client::{api, ClientConfig, ConsoleClient};

const DEFAULT_CREDENTIAL_FILE: &str = ".admin-console/credentials.json";

#[derive(Parser)]
#[command(name = "admin-console")]
#[command(about = "Command-line client for the admin console backend", long_about = None)]
struct Cli {
    /// TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the tokens
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// Captcha answer
        #[arg(long, default_value = "")]
        code: String,
        /// Captcha id from `captcha`
        #[arg(long, default_value_t = 0)]
        captcha_id: i64,
    },
    /// Fetch a captcha challenge
    Captcha,
    /// Forget the stored tokens
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Print one page of a list
    List {
        resource: Resource,
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long)]
        page_size: Option<i64>,
        /// Search filter, repeatable
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, Value)>,
        /// Column to hide, repeatable
        #[arg(long = "hide")]
        hidden: Vec<String>,
        #[arg(long, default_value = "en-US")]
        locale: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Resource {
    Users,
    Roles,
    Menus,
    Links,
    Categories,
    Fans,
    Enterprises,
    Members,
    Orders,
}

impl Resource {
    fn path(self) -> &'static str {
        match self {
            Resource::Users => "/manage/user/list",
            Resource::Roles => "/manage/role/list",
            Resource::Menus => "/manage/router/list",
            Resource::Links => "/link/list",
            Resource::Categories => "/link/category/list",
            Resource::Fans => "/company/fans/list",
            Resource::Enterprises => "/company/list",
            Resource::Members => "/company/member/list",
            Resource::Orders => "/cps/order/list",
        }
    }

    /// `(key, en-US title, zh-CN title)` per column.
    fn columns(self) -> &'static [(&'static str, &'static str, &'static str)] {
        match self {
            Resource::Users => &[
                ("index", "No.", "序号"),
                ("admin_user_username", "Username", "用户名"),
                ("admin_user_status", "Status", "状态"),
            ],
            Resource::Roles => &[
                ("index", "No.", "序号"),
                ("admin_role_name", "Role", "角色名称"),
                ("admin_role_desc", "Description", "角色描述"),
            ],
            Resource::Menus => &[
                ("id", "ID", "ID"),
                ("admin_router_menu_name", "Menu", "菜单名称"),
                ("admin_router_route_path", "Path", "路由路径"),
                ("admin_router_menu_type", "Type", "菜单类型"),
            ],
            Resource::Links => &[
                ("index", "No.", "序号"),
                ("cps_link_name", "Name", "链接名"),
                ("cps_link_type", "Type", "类型"),
                ("cps_link_status", "Status", "状态"),
            ],
            Resource::Categories => &[
                ("index", "No.", "序号"),
                ("cps_category_name", "Category", "分类名"),
                ("cps_category_status", "Status", "状态"),
            ],
            Resource::Fans => &[
                ("index", "No.", "序号"),
                ("company_fans_name", "Name", "粉丝昵称"),
                ("company_fans_status", "Status", "状态"),
                ("company_fans_last_active_time", "Last active", "最后活跃时间"),
            ],
            Resource::Enterprises => &[
                ("index", "No.", "序号"),
                ("company_name", "Company", "企业名称"),
                ("company_corp_id", "Corp ID", "企业标识"),
                ("company_status", "Status", "状态"),
            ],
            Resource::Members => &[
                ("index", "No.", "序号"),
                ("company_member_user_name", "Name", "成员名称"),
                ("company_member_user_account", "Account", "成员账号"),
            ],
            Resource::Orders => &[("index", "No.", "序号"), ("id", "ID", "ID")],
        }
    }
}

fn column_factory(resource: Resource) -> impl Fn(&str) -> Vec<TableColumn> + Send + Sync + 'static {
    move |locale: &str| {
        resource
            .columns()
            .iter()
            .map(|(key, en, zh)| {
                let title = if locale.starts_with("zh") { zh } else { en };
                TableColumn::new(*key, *title)
            })
            .collect()
    }
}

fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn credential_path(config: &ClientConfig) -> PathBuf {
    if let Some(path) = &config.session.credential_file {
        return PathBuf::from(path);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(DEFAULT_CREDENTIAL_FILE),
        None => PathBuf::from(DEFAULT_CREDENTIAL_FILE),
    }
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn list(
    client: &ConsoleClient,
    config: &ClientConfig,
    resource: Resource,
    page: i64,
    page_size: Option<i64>,
    filters: Vec<(String, Value)>,
    hidden: Vec<String>,
    locale: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let api = EndpointTable::<Map<String, Value>>::new(client.flat().clone(), resource.path());
    let (_locale_tx, locale_rx) = watch::channel(locale);
    let mut table = TableController::new(api, &config.table, Map::new(), column_factory(resource), locale_rx);

    for key in &hidden {
        if !table.set_column_checked(key, false) {
            tracing::warn!(column = %key, "Unknown column");
        }
    }
    table.update_search_params(filters.into_iter().collect());

    let page_size = page_size.unwrap_or(config.table.default_page_size);
    table.on_page_change(page, page_size).await?;

    let columns = table.columns();
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let projected: Map<String, Value> = columns
                .iter()
                .map(|column| {
                    let value = if column.key == "index" {
                        Value::from(row.index)
                    } else {
                        row.record.get(&column.key).cloned().unwrap_or(Value::Null)
                    };
                    (column.title.clone(), value)
                })
                .collect();
            Value::Object(projected)
        })
        .collect();

    print_json(&json!({
        "rows": rows,
        "pagination": table.pagination(Viewport::Desktop),
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.observability);

    let store = Arc::new(FileCredentialStore::open(credential_path(&config))?);
    let client = ConsoleClient::new(
        &config,
        store,
        Arc::new(TerminalNavigator),
        Arc::new(TerminalNotifier),
    )?;

    let outcome = match cli.command {
        Commands::Login {
            username,
            password,
            code,
            captcha_id,
        } => {
            let request = LoginRequest {
                username,
                password,
                code,
                id: captcha_id,
            };
            match client.login(&request).await {
                Ok(()) => {
                    eprintln!("Signed in.");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
        Commands::Captcha => match api::auth::fetch_captcha(client.auth()).await {
            Ok(captcha) => print_json(&serde_json::to_value(captcha)?),
            Err(e) => Err(e.into()),
        },
        Commands::Logout => {
            client.logout();
            Ok(())
        }
        Commands::Whoami => match api::auth::fetch_user_info(client.auth()).await {
            Ok(info) => print_json(&serde_json::to_value(info)?),
            Err(e) => Err(e.into()),
        },
        Commands::List {
            resource,
            page,
            page_size,
            filters,
            hidden,
            locale,
        } => list(&client, &config, resource, page, page_size, filters, hidden, locale).await,
    };

    if client.session().redirect_pending() {
        tokio::time::sleep(Duration::from_millis(config.session.redirect_delay_ms + 20)).await;
    }
    client.teardown();

    outcome
}
