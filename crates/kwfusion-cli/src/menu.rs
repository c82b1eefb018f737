//! `menu` subcommand: list supported locations and languages.

pub(crate) async fn run_menu() -> anyhow::Result<()> {
    let config = kwfusion_core::load_app_config()?;
    let client = crate::labs_client(&config)?;
    let menu = client.locations_and_languages().await?;

    println!("locations ({}):", menu.locations.len());
    for option in &menu.locations {
        println!("  {:>8}  {}", option.value, option.label);
    }

    println!("languages ({}):", menu.languages.len());
    for option in &menu.languages {
        println!("  {:>8}  {}", option.value, option.label);
    }

    Ok(())
}
