fn main() -> anyhow::Result<()> {
    inktag::cli::run_cli()
}
