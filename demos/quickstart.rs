use chrono::Utc;
use qtty::Days;
use solar_terminator::{
    sub_solar_longitude, JulianDate, ModuleRegistry, SolarTerminator, VecSurface,
};

fn main() {
    env_logger::init();

    let mut registry = ModuleRegistry::new();
    let overlay = SolarTerminator::new(VecSurface::new(), Some(Utc::now()), None);
    overlay.register(&mut registry);

    let jd = JulianDate::from_utc(overlay.date_time());
    let polygon = overlay.polygon();

    println!("UTC: {}", overlay.date_time());
    println!("{jd}");
    println!("GMST: {} h", jd.gmst().value());
    println!("Sub-solar point: {}", overlay.sun_location());
    println!(
        "Terminator: {} vertices, night cap at latitude {}",
        polygon.len(),
        polygon.closing_latitude()
    );
    for loc in polygon.meridian_samples().iter().step_by(30) {
        println!("  {loc}");
    }
    println!("Fill: {}", overlay.options().fill_color);

    // Six hours on, the sub-solar meridian has moved 90 degrees west.
    if let Some(later) = (jd + Days::new(0.25)).to_utc() {
        println!(
            "At {later}: sub-solar longitude {:.3}",
            sub_solar_longitude(later)
        );
    }
}
