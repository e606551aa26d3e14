fn main() {
    if let Err(err) = t9a::run() {
        eprintln!("{}", t9a::format_error(&err));
        std::process::exit(1);
    }
}
