fn main() -> anyhow::Result<()> {
    filter_lang::run()
}
