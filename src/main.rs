fn main() -> std::io::Result<()> {
    quince_chess::uci::uci_top::run_stdio_loop()
}
