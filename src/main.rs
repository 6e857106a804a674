fn main() {
    if let Err(error) = saldo4clinic::run() {
        eprintln!("Error: {}", error);
        for cause in error.iter().skip(1) {
            eprintln!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
