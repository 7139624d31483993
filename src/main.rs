use nanowire_negf::app::run;
fn main() -> color_eyre::Result<()> {
    run::<f64>()
}
