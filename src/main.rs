fn main() {
    if let Err(err) = mbti_atlas::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
