use std::cell::Cell;

use any_of::{
    AnyOf,
    Visitor,
};
use test_case::test_case;

type Shape = AnyOf<(Circle, Square, Triangle)>;

#[derive(Debug, Clone, PartialEq)]
struct Circle {
    radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Square {
    side: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Triangle {
    base: f64,
    height: f64,
}

struct Area;

impl Visitor<&Circle> for Area {
    type Output = f64;

    fn visit(self, circle: &Circle) -> f64 {
        std::f64::consts::PI * circle.radius * circle.radius
    }
}

impl Visitor<&Square> for Area {
    type Output = f64;

    fn visit(self, square: &Square) -> f64 {
        square.side * square.side
    }
}

impl Visitor<&Triangle> for Area {
    type Output = f64;

    fn visit(self, triangle: &Triangle) -> f64 {
        triangle.base * triangle.height / 2.0
    }
}

/// Scales the live shape in place.
struct Scale(f64);

impl Visitor<&mut Circle> for Scale {
    type Output = ();

    fn visit(self, circle: &mut Circle) {
        circle.radius *= self.0;
    }
}

impl Visitor<&mut Square> for Scale {
    type Output = ();

    fn visit(self, square: &mut Square) {
        square.side *= self.0;
    }
}

impl Visitor<&mut Triangle> for Scale {
    type Output = ();

    fn visit(self, triangle: &mut Triangle) {
        triangle.base *= self.0;
        triangle.height *= self.0;
    }
}

/// Names the shape, consuming it.
struct Name;

impl Visitor<Circle> for Name {
    type Output = &'static str;

    fn visit(self, _: Circle) -> &'static str {
        "circle"
    }
}

impl Visitor<Square> for Name {
    type Output = &'static str;

    fn visit(self, _: Square) -> &'static str {
        "square"
    }
}

impl Visitor<Triangle> for Name {
    type Output = &'static str;

    fn visit(self, _: Triangle) -> &'static str {
        "triangle"
    }
}

#[test_case(Shape::new(Square { side: 3.0 }), 9.0 ; "square")]
#[test_case(Shape::new(Triangle { base: 4.0, height: 3.0 }), 6.0 ; "triangle")]
#[test_case(Shape::new(Circle { radius: 1.0 }), std::f64::consts::PI ; "circle")]
fn test_visit(shape: Shape, expected: f64) {
    assert_eq!(shape.visit(Area), expected);
}

#[test]
fn test_visit_mut() {
    let mut shape = Shape::new(Triangle {
        base: 2.0,
        height: 5.0,
    });

    shape.visit_mut(Scale(2.0));
    assert_eq!(shape.visit(Area), 20.0);
}

#[test]
fn test_visit_into() {
    assert_eq!(Shape::new(Circle { radius: 2.0 }).visit_into(Name), "circle");
    assert_eq!(Shape::new(Square { side: 2.0 }).visit_into(Name), "square");
}

#[test]
fn test_exactly_one_handler_runs() {
    let calls = [Cell::new(0), Cell::new(0), Cell::new(0)];

    for (index, value) in [
        AnyOf::<(u8, String, char)>::new('c'),
        AnyOf::new(1_u8),
        AnyOf::new(String::from("s")),
    ]
    .into_iter()
    .enumerate()
    {
        let expected = value.index();
        value.match_ref((
            |_: &u8| calls[0].set(calls[0].get() + 1),
            |_: &String| calls[1].set(calls[1].get() + 1),
            |_: &char| calls[2].set(calls[2].get() + 1),
        ));

        assert_eq!(calls.iter().map(Cell::get).sum::<i32>(), index as i32 + 1);
        assert_eq!(calls[expected].get(), 1);
    }
}

#[test]
fn test_match_mut() {
    let mut value: AnyOf<(Vec<u8>, String)> = AnyOf::new(String::from("hello"));

    let length = value.match_mut((
        |bytes: &mut Vec<u8>| {
            bytes.push(b'!');
            bytes.len()
        },
        |text: &mut String| {
            text.push('!');
            text.len()
        },
    ));

    assert_eq!(length, 6);
    assert_eq!(value.get::<String, _>().map(String::as_str), Some("hello!"));
}

#[test]
fn test_match_into() {
    let value: AnyOf<(Vec<u8>, String)> = AnyOf::new(vec![1, 2, 3]);

    let owned: Vec<u8> = value.match_into((|bytes: Vec<u8>| bytes, |text: String| text.into_bytes()));
    assert_eq!(owned, [1, 2, 3]);
}

#[test]
fn test_handlers_capture_environment() {
    let prefix = String::from("text");
    let value: AnyOf<(u32, &str)> = AnyOf::new("borrowed");

    let log = value.match_ref((
        |n: &u32| format!("number {n}"),
        |s: &&str| format!("{prefix} {s}"),
    ));

    assert_eq!(log, "text borrowed");
}

#[test]
fn test_twelve_alternatives() {
    type Wide = AnyOf<(u8, u16, u32, u64, i8, i16, i32, i64, char, bool, String, Vec<u8>)>;

    let value = Wide::new(true);
    assert_eq!(value.index(), 9);
    assert_eq!(Wide::COUNT, 12);

    let description = value.match_ref((
        |_: &u8| "u8",
        |_: &u16| "u16",
        |_: &u32| "u32",
        |_: &u64| "u64",
        |_: &i8| "i8",
        |_: &i16| "i16",
        |_: &i32| "i32",
        |_: &i64| "i64",
        |_: &char| "char",
        |_: &bool| "bool",
        |_: &String| "String",
        |_: &Vec<u8>| "Vec<u8>",
    ));
    assert_eq!(description, "bool");
}
