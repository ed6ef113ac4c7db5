//! gdts - Godot scripting API to TypeScript declaration generator

fn main() {
    gdts_cli::init_tracing();
    let code = gdts_cli::run_cli(std::env::args().collect());
    std::process::exit(code);
}
