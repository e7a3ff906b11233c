use floorplan::import;
use floorplan::{DetectorParams, FloorPlan, SynthesisTarget};

#[cfg(feature = "tracing")]
use floorplan::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: detect_rooms <image_path>");
        return Ok(());
    };

    let plan = FloorPlan::new();
    let target = SynthesisTarget::new(
        1200,
        900,
        plan.next_room_index(),
        plan.legend.first_id(),
        plan.sections.first_id(),
    );

    let rooms = import::detect_rooms_from_path(path, &DetectorParams::default(), &target)?;
    match rooms.len() {
        0 => println!("no rooms detected"),
        n => {
            for room in &rooms {
                println!("{}: {:?}", room.name, room.rect);
            }
            println!("detected {n} room(s)");
        }
    }

    Ok(())
}
