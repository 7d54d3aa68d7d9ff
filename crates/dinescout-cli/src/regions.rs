use dinescout_core::PresetRegions;

/// Prints the preset table, marking the default region.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn run_regions(presets: &PresetRegions) -> anyhow::Result<()> {
    println!("{:<3}{:<12}{:<30}BBOX (S,W,N,E)", "", "NAME", "LABEL");
    for preset in presets.iter() {
        let marker = if preset.name == presets.default_name() {
            "*"
        } else {
            ""
        };
        let bbox = &preset.bbox;
        println!(
            "{marker:<3}{:<12}{:<30}{},{},{},{}",
            preset.name, preset.label, bbox.lat_min, bbox.lon_min, bbox.lat_max, bbox.lon_max
        );
    }
    Ok(())
}
