use crate::codec::codec::FunctionCodec;
use crate::codec::compactcodec::CompactCodec;
use crate::codec::descriptivecodec::DescriptiveCodec;
use crate::math::function::function::Function;
use crate::tabulated::point::{
    EPSILON,
    Point
};
use crate::tabulated::pointstore::StorageKind;
use crate::tabulated::tabulatedfunction::TabulatedFunction;
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Operation {
    Add(f64, f64),
    Delete(usize),
    SetPoint(usize, f64, f64),
    SetX(usize, f64),
    SetY(usize, f64),
}

prop_compose! {
    /// 嚴格遞增的點列：起點加上至少 1e-6 的正間距
    fn arb_points()(
        start in -1e3f64..1e3,
        gaps in prop::collection::vec(1e-6f64..10.0, 1..40),
        ys in prop::collection::vec(-1e6f64..1e6, 41),
    ) -> Vec<Point> {
        let mut x = start;
        let mut points = vec![Point::new(x, ys[0])];
        for (i, gap) in gaps.iter().enumerate() {
            x += gap;
            points.push(Point::new(x, ys[i + 1]));
        }
        points
    }
}

fn arb_kind() -> impl Strategy<Value = StorageKind> {
    prop_oneof![Just(StorageKind::Array), Just(StorageKind::LinkedList)]
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (-1.2e3f64..1.5e3, -1e3f64..1e3).prop_map(|(x, y)| Operation::Add(x, y)),
        (0usize..60).prop_map(Operation::Delete),
        (0usize..60, -1.2e3f64..1.5e3, -1e3f64..1e3).prop_map(|(i, x, y)| Operation::SetPoint(i, x, y)),
        (0usize..60, -1.2e3f64..1.5e3).prop_map(|(i, x)| Operation::SetX(i, x)),
        (0usize..60, -1e3f64..1e3).prop_map(|(i, y)| Operation::SetY(i, y)),
    ]
}

fn apply(function: &mut TabulatedFunction, operation: &Operation) -> Result<(), TabulatedFunctionError> {
    match *operation {
        Operation::Add(x, y) => function.add_point(Point::new(x, y)),
        Operation::Delete(i) => function.delete_point(i),
        Operation::SetPoint(i, x, y) => function.set_point(i, Point::new(x, y)),
        Operation::SetX(i, x) => function.set_point_x(i, x),
        Operation::SetY(i, y) => function.set_point_y(i, y),
    }
}

fn bits(function: &TabulatedFunction) -> Vec<(u64, u64)> {
    function
        .points()
        .iter()
        .map(|pt| (pt.x().to_bits(), pt.y().to_bits()))
        .collect()
}

fn is_strictly_increasing(function: &TabulatedFunction) -> bool {
    function
        .points()
        .windows(2)
        .all(|w| w[1].x() - w[0].x() >= EPSILON)
}

proptest! {
    /// Property: 任意操作序列之後 x 仍嚴格遞增且點數 >= 2
    #[test]
    fn prop_ordering_invariant(
        points in arb_points(),
        kind in arb_kind(),
        operations in prop::collection::vec(arb_operation(), 0..80),
    ) {
        let mut function = TabulatedFunction::from_points(kind, &points).unwrap();
        for operation in &operations {
            let before = bits(&function);
            let result = apply(&mut function, operation);
            if result.is_err() {
                // 失敗的操作不改變任何狀態
                prop_assert_eq!(&bits(&function), &before);
            }
            prop_assert!(function.points_count() >= 2);
            prop_assert!(is_strictly_increasing(&function));
        }
    }

    /// Property: 兩種 store 對同一操作序列的結果完全一致
    #[test]
    fn prop_array_and_linked_agree(
        points in arb_points(),
        operations in prop::collection::vec(arb_operation(), 0..80),
    ) {
        let mut array = TabulatedFunction::from_points(StorageKind::Array, &points).unwrap();
        let mut linked = TabulatedFunction::from_points(StorageKind::LinkedList, &points).unwrap();
        for operation in &operations {
            let array_result = apply(&mut array, operation);
            let linked_result = apply(&mut linked, operation);
            prop_assert_eq!(array_result.is_ok(), linked_result.is_ok());
        }
        prop_assert_eq!(bits(&array), bits(&linked));
    }

    /// Property: value(x_i) == y_i，定義域外為 NaN
    #[test]
    fn prop_interpolation_exact_at_nodes(points in arb_points(), kind in arb_kind()) {
        let function = TabulatedFunction::from_points(kind, &points).unwrap();
        for (i, point) in points.iter().enumerate() {
            prop_assert!((function.value(function.point_x(i).unwrap()) - point.y()).abs() < EPSILON);
        }
        let left = function.left_domain_border();
        let right = function.right_domain_border();
        prop_assert!(function.value(left - 1e-3).is_nan());
        prop_assert!(function.value(right + 1e-3).is_nan());
        prop_assert!(!function.value((left + right) / 2.0).is_nan());
    }

    /// Property: 插值結果落在所在區間兩端點 y 值之間
    #[test]
    fn prop_interpolation_bounded_by_segment(points in arb_points(), t in 0.0f64..1.0) {
        let function = TabulatedFunction::from_points(StorageKind::Array, &points).unwrap();
        for w in points.windows(2) {
            let x = w[0].x() + t * (w[1].x() - w[0].x());
            let value = function.value(x);
            let (lo, hi) = (w[0].y().min(w[1].y()), w[0].y().max(w[1].y()));
            prop_assert!(value >= lo - 1e-6 && value <= hi + 1e-6);
        }
    }

    /// Property: compact 往返 bit 等同，長度 = 4 + 16n
    #[test]
    fn prop_compact_roundtrip(points in arb_points(), kind in arb_kind()) {
        let function = TabulatedFunction::from_points(kind, &points).unwrap();
        let codec = CompactCodec::with_storage(kind);
        let bytes = codec.encode(&function).unwrap();
        prop_assert_eq!(bytes.len(), 4 + 16 * points.len());
        let decoded = codec.decode(&bytes).unwrap();
        prop_assert_eq!(bits(&decoded), bits(&function));
    }

    /// Property: descriptive 往返 bit 等同，且永遠比 compact 長
    #[test]
    fn prop_descriptive_roundtrip(points in arb_points(), kind in arb_kind()) {
        let function = TabulatedFunction::from_points(kind, &points).unwrap();
        let bytes = DescriptiveCodec::new().encode(&function).unwrap();
        let compact = CompactCodec::new().encode(&function).unwrap();
        prop_assert!(bytes.len() > compact.len());
        let decoded = DescriptiveCodec::new().decode(&bytes).unwrap();
        prop_assert_eq!(decoded.kind(), kind);
        prop_assert_eq!(bits(&decoded), bits(&function));
    }

    /// Property: 任意位元組都不會讓解碼 panic；成功時結果仍滿足不變量
    #[test]
    fn prop_decode_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        for result in [CompactCodec::new().decode(&bytes), DescriptiveCodec::new().decode(&bytes)] {
            match result {
                Ok(function) => prop_assert!(is_strictly_increasing(&function)),
                Err(error) => prop_assert!(matches!(error, TabulatedFunctionError::CorruptStream(_))),
            }
        }
    }

    /// Property: 交換任意兩個相鄰點的 x 後 compact 解碼必定失敗
    #[test]
    fn prop_compact_rejects_unordered(points in arb_points(), swap_at in 0usize..40) {
        let function = TabulatedFunction::from_points(StorageKind::Array, &points).unwrap();
        let mut bytes = CompactCodec::new().encode(&function).unwrap();
        let i = swap_at % (points.len() - 1);
        let lhs = 4 + 16 * i;
        let rhs = lhs + 16;
        let (head, tail) = bytes.split_at_mut(rhs);
        head[lhs..lhs + 8].swap_with_slice(&mut tail[..8]);
        prop_assert!(matches!(
            CompactCodec::new().decode(&bytes),
            Err(TabulatedFunctionError::CorruptStream(_))
        ));
    }
}
