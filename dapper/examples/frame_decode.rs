//! Decode a frame that arrives in drips, the way a TCP stream delivers
//! it: describe the layout once, feed fragments until the value is
//! whole, then serialize a reply with the same description.

use dapper::{Node, Progress, Record, Session, Value, emit, feed};

fn main() {
    let frame = Node::struct_of([
        ("version", Node::uint8()),
        ("length", Node::uint24()),
        (
            "window",
            Node::struct_of([("lo", Node::int16()), ("hi", Node::int16())]),
        ),
    ]);

    // Pretend these fragments arrived from a socket, one recv at a time.
    let wire: &[&[u8]] = &[&[0x01], &[0x00, 0x01], &[0x00, 0xFF], &[0xFE, 0x00, 0x40]];

    let mut session = Session::new();
    for fragment in wire {
        match feed(&frame, fragment, &mut session).expect("well-formed frame") {
            Progress::Incomplete => {
                println!(
                    "  ... {} byte(s) buffered, waiting for more",
                    session.reservoir().unclaimed()
                );
            }
            Progress::Complete(value) => {
                println!("decoded: {value:?}");
            }
        }
    }

    // The same description serializes.
    let reply = Value::Record(
        Record::new()
            .with("version", 1)
            .with("length", 4)
            .with(
                "window",
                Record::new().with("lo", -128).with("hi", 127),
            ),
    );
    let bytes = emit(&frame, &reply).expect("reply matches the layout");
    println!("reply on the wire: {bytes:02X?}");
}
