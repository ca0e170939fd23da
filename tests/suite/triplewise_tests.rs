//! Triplewise application.

use pretty_assertions::assert_eq;

use cubek_lambda::builtin::{Fma, Lerp, Sum3};
use cubek_lambda::{DType, Lambda, LambdaArray};

use crate::{R, array, client, read, small_grid};

#[test]
fn test_sum3() {
    let client = client();
    let w = array(&client, &[3], &[1.0f32, 1.0, 1.0]);
    let x = array(&client, &[3], &[2.0f32, 2.0, 2.0]);
    let y = array(&client, &[3], &[3.0f32, 3.0, 3.0]);
    let mut z = LambdaArray::<R>::zeros(&client, &[3], DType::F32);

    w.apply_triplewise_lambda(&client, &Lambda::<Sum3>::new(), &x, &y, &mut z, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &z), vec![6.0, 6.0, 6.0]);
}

#[test]
fn test_fma_across_grid_strides() {
    let client = client();
    let length = 10 * small_grid().total_units() as usize + 1;
    let w: Vec<i32> = (0..length as i32).collect();
    let x = vec![2i32; length];
    let y = vec![-1i32; length];

    let w = array(&client, &[length], &w);
    let x = array(&client, &[length], &x);
    let y = array(&client, &[length], &y);
    let mut z = LambdaArray::<R>::zeros(&client, &[length], DType::I32);

    w.apply_triplewise_lambda(&client, &Lambda::<Fma>::new(), &x, &y, &mut z, Some(small_grid()))
        .unwrap();

    let expected: Vec<i32> = (0..length as i32).map(|v| 2 * v - 1).collect();
    assert_eq!(read::<i32>(&client, &z), expected);
}

#[test]
fn test_lerp() {
    let client = client();
    let start = array(&client, &[4], &[0.0f32, 0.0, 10.0, -4.0]);
    let end = array(&client, &[4], &[8.0f32, 8.0, 20.0, 4.0]);
    let weight = array(&client, &[4], &[0.0f32, 0.5, 0.25, 1.0]);
    let mut z = LambdaArray::<R>::zeros(&client, &[4], DType::F32);

    start
        .apply_triplewise_lambda(&client, &Lambda::<Lerp>::new(), &end, &weight, &mut z, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &z), vec![0.0, 4.0, 12.5, 4.0]);
}

#[test]
fn test_same_array_in_every_role() {
    let client = client();
    let x = array(&client, &[3], &[1i32, 2, 3]);
    let mut target = x.alias();

    x.apply_triplewise_lambda(&client, &Lambda::<Sum3>::new(), &x, &x, &mut target, None)
        .unwrap();

    assert_eq!(read::<i32>(&client, &x), vec![3, 6, 9]);
    assert_eq!(x.in_flight_reads(), 0);
    assert!(!x.is_being_written());
}
