fn main() -> anyhow::Result<()> {
    let exit_code = symsat::runner::run()?;
    std::process::exit(exit_code);
}
