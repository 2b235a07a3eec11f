fn main() {
    if let Err(err) = json_graph_viz::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
