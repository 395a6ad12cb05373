fn main() -> anyhow::Result<()> {
    microwave_lib::run()
}
