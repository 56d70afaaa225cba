use sphere_glow::AppConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = AppConfig::default();
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.normal_map(path);
    }

    if let Err(err) = sphere_glow::run(config) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
