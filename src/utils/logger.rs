use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 優先，否則只顯示本 crate 的日誌
fn crate_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = if verbose {
            "xmas_countdown=debug,info"
        } else {
            "xmas_countdown=info"
        };
        EnvFilter::new(directive)
    })
}

fn init(verbose: bool, json: bool) {
    // stdout 留給倒數輸出
    let layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(crate_filter(verbose));

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}

pub fn init_cli_logger(verbose: bool) {
    init(verbose, false);
}

/// JSON 格式，給需要收集日誌的宿主環境使用
pub fn init_json_logger(verbose: bool) {
    init(verbose, true);
}
