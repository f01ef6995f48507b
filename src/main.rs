fn main() {
    xmlscrub::cli::run();
}
