fn main() -> anyhow::Result<()> {
    kcpp_tools::run()
}
