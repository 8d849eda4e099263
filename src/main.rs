fn main() {
    dataconf::app::cli::run();
}
