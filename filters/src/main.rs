use vespa_filters::core::CoreApp;

fn main() {
    if let Err(e) = CoreApp::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
