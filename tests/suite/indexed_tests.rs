//! Indexed application: the transformation sees the row-major logical index.

use pretty_assertions::assert_eq;

use cubek_lambda::builtin::{IndexShift, IndexValue, IndexedAdd, IndexedMulShift};
use cubek_lambda::{DType, Lambda, LambdaArray};

use crate::{R, array, client, read, small_grid};

#[test]
fn test_index_exposure() {
    let client = client();
    let x = LambdaArray::<R>::zeros(&client, &[3, 4], DType::I32);
    let mut z = LambdaArray::<R>::zeros(&client, &[3, 4], DType::I32);

    x.apply_indexed_lambda(&client, &Lambda::<IndexValue>::new(), &mut z, None)
        .unwrap();

    assert_eq!(read::<i32>(&client, &z), (0..12).collect::<Vec<_>>());
}

#[test]
fn test_index_exposure_across_grid_strides() {
    let client = client();
    let length = 10 * small_grid().total_units() as usize + 3;
    let x = LambdaArray::<R>::zeros(&client, &[length], DType::I32);
    let mut z = LambdaArray::<R>::zeros(&client, &[length], DType::I32);

    x.apply_indexed_lambda(&client, &Lambda::<IndexValue>::new(), &mut z, Some(small_grid()))
        .unwrap();

    assert_eq!(read::<i32>(&client, &z), (0..length as i32).collect::<Vec<_>>());
}

#[test]
fn test_index_follows_destination_logical_order() {
    let client = client();
    let x = LambdaArray::<R>::zeros(&client, &[4, 3], DType::I32);
    // [4, 3] transposed view over a row-major [3, 4] buffer.
    let buffer = LambdaArray::<R>::zeros(&client, &[3, 4], DType::I32);
    let mut z = buffer.view(&[4, 3], &[1, 4]).unwrap();

    x.apply_indexed_lambda(&client, &Lambda::<IndexValue>::new(), &mut z, None)
        .unwrap();

    assert_eq!(read::<i32>(&client, &z), (0..12).collect::<Vec<_>>());
    assert_eq!(
        read::<i32>(&client, &buffer),
        vec![0, 3, 6, 9, 1, 4, 7, 10, 2, 5, 8, 11]
    );
}

#[test]
fn test_index_shift() {
    let client = client();
    let x = array(&client, &[5], &[10.0f32, 10.0, 10.0, 10.0, 10.0]);
    let mut z = LambdaArray::<R>::zeros(&client, &[5], DType::F32);

    x.apply_indexed_lambda(&client, &Lambda::<IndexShift>::new(), &mut z, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &z), vec![10.0, 11.0, 12.0, 13.0, 14.0]);
}

#[test]
fn test_indexed_pairwise() {
    let client = client();
    let x = array(&client, &[2, 2], &[1i32, 2, 3, 4]);
    let y = array(&client, &[2, 2], &[10i32, 20, 30, 40]);
    let mut z = LambdaArray::<R>::zeros(&client, &[2, 2], DType::I32);

    x.apply_indexed_pairwise_lambda(&client, &Lambda::<IndexedAdd>::new(), &y, &mut z, None)
        .unwrap();
    assert_eq!(read::<i32>(&client, &z), vec![11, 23, 35, 47]);

    x.apply_indexed_pairwise_lambda(
        &client,
        &Lambda::<IndexedMulShift>::with_args([100.0]),
        &y,
        &mut z,
        None,
    )
    .unwrap();
    assert_eq!(read::<i32>(&client, &z), vec![10, 140, 290, 460]);
}
