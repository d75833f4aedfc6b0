fn main() -> anyhow::Result<()> {
    viewer::system::tracing::initialize()?;

    match viewer::system::launcher::launch()? {
        Some(child) => println!("Log viewer started (pid {})", child.id()),
        None => println!("Log viewer not started, see logs/viewer.log"),
    }
    Ok(())
}
