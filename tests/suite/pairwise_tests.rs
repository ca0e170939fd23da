//! Pairwise application and scalar broadcast.

use pretty_assertions::assert_eq;

use cubek_lambda::builtin::{Add, Axpy, Mul, ReverseSub, Sub};
use cubek_lambda::{DType, Lambda, LambdaArray, Order, ShapeDescriptor};

use crate::{R, array, client, read, small_grid};

#[test]
fn test_add() {
    let client = client();
    let x = array(&client, &[3], &[1.0f32, 2.0, 3.0]);
    let y = array(&client, &[3], &[0.5f32, 0.25, 0.125]);
    let mut z = LambdaArray::<R>::zeros(&client, &[3], DType::F32);

    x.apply_pairwise_lambda(&client, &Lambda::<Add>::new(), &y, &mut z, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &z), vec![1.5, 2.25, 3.125]);
}

#[test]
fn test_scalar_broadcast() {
    let client = client();
    let x = array(&client, &[4], &[1i32, 2, 3, 4]);
    let ten = array(&client, &[1], &[10i32]);
    let mut z = LambdaArray::<R>::zeros(&client, &[4], DType::I32);

    x.apply_pairwise_lambda(&client, &Lambda::<ReverseSub>::new(), &ten, &mut z, None)
        .unwrap();
    assert_eq!(read::<i32>(&client, &z), vec![9, 8, 7, 6]);

    x.apply_pairwise_lambda(&client, &Lambda::<Sub>::new(), &ten, &mut z, None)
        .unwrap();
    assert_eq!(read::<i32>(&client, &z), vec![-9, -8, -7, -6]);
}

#[test]
fn test_scalar_broadcast_large() {
    let client = client();
    let length = 10 * small_grid().total_units() as usize;
    let data: Vec<f32> = (0..length).map(|i| i as f32).collect();
    let x = array(&client, &[length], &data);
    let two = array(&client, &[1, 1], &[2.0f32]);
    let mut z = LambdaArray::<R>::zeros(&client, &[length], DType::F32);

    x.apply_pairwise_lambda(&client, &Lambda::<Mul>::new(), &two, &mut z, Some(small_grid()))
        .unwrap();

    let expected: Vec<f32> = data.iter().map(|v| v * 2.0).collect();
    assert_eq!(read::<f32>(&client, &z), expected);
}

#[test]
fn test_scalar_from_view() {
    let client = client();
    let x = array(&client, &[3], &[1.0f32, 2.0, 3.0]);
    let y = array(&client, &[3], &[5.0f32, 6.0, 7.0]);
    // Single-element view on the head of `y`.
    let head = y
        .view_with_layout(ShapeDescriptor::contiguous(&[1], Order::C))
        .unwrap();
    let mut z = LambdaArray::<R>::zeros(&client, &[3], DType::F32);

    x.apply_pairwise_lambda(&client, &Lambda::<Add>::new(), &head, &mut z, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &z), vec![6.0, 7.0, 8.0]);
}

#[test]
fn test_axpy() {
    let client = client();
    let x = array(&client, &[2, 2], &[1.0f32, 2.0, 3.0, 4.0]);
    let y = array(&client, &[2, 2], &[1.0f32, 1.0, 1.0, 1.0]);
    let mut z = LambdaArray::<R>::zeros(&client, &[2, 2], DType::F32);

    x.apply_pairwise_lambda(&client, &Lambda::<Axpy>::with_args([3.0]), &y, &mut z, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &z), vec![4.0, 7.0, 10.0, 13.0]);
}

#[test]
fn test_in_place_accumulate() {
    let client = client();
    let acc = array(&client, &[4], &[1i32, 1, 1, 1]);
    let step = array(&client, &[4], &[1i32, 2, 3, 4]);
    let mut target = acc.alias();

    for _ in 0..3 {
        acc.apply_pairwise_lambda(&client, &Lambda::<Add>::new(), &step, &mut target, None)
            .unwrap();
    }

    assert_eq!(read::<i32>(&client, &acc), vec![4, 7, 10, 13]);
}
