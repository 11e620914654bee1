fn main() {
    if let Err(err) = flowchart_editor::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
