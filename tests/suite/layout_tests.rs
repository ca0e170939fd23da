//! Direct and resolved addressing must agree element for element.

use pretty_assertions::assert_eq;

use cubek_lambda::builtin::{Add, IndexShift, IndexedAdd, Scale, Square, Sum3};
use cubek_lambda::{Addressing, DType, Lambda, LambdaArray, Order};

use crate::{R, array, client, read};

/// The same logical [2, 3] tensor, once contiguous and once as a transposed
/// view over a row-major [3, 2] buffer.
fn both_layouts(client: &cubecl::client::ComputeClient<R>) -> (LambdaArray<R>, LambdaArray<R>) {
    let contiguous = array(client, &[2, 3], &[0.0f32, 2.0, 4.0, 1.0, 3.0, 5.0]);
    let buffer = array(client, &[3, 2], &[0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let transposed = buffer.view(&[2, 3], &[1, 2]).unwrap();
    (contiguous, transposed)
}

#[test]
fn test_layouts_hold_same_values() {
    let client = client();
    let (contiguous, transposed) = both_layouts(&client);

    assert_eq!(Addressing::detect(&[contiguous.layout()]), Addressing::Direct);
    assert_eq!(Addressing::detect(&[transposed.layout()]), Addressing::Resolved);
    assert_eq!(read::<f32>(&client, &contiguous), read::<f32>(&client, &transposed));
}

#[test]
fn test_unary_equivalence() {
    let client = client();
    let (contiguous, transposed) = both_layouts(&client);
    let mut direct = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);
    let mut resolved = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);

    let lambda = Lambda::<Square>::new();
    contiguous.apply_lambda(&client, &lambda, &mut direct, None).unwrap();
    transposed.apply_lambda(&client, &lambda, &mut resolved, None).unwrap();

    assert_eq!(read::<f32>(&client, &direct), read::<f32>(&client, &resolved));
    assert_eq!(read::<f32>(&client, &direct), vec![0.0, 4.0, 16.0, 1.0, 9.0, 25.0]);
}

#[test]
fn test_indexed_equivalence() {
    let client = client();
    let (contiguous, transposed) = both_layouts(&client);
    let mut direct = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);
    let mut resolved = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);

    let lambda = Lambda::<IndexShift>::new();
    contiguous.apply_indexed_lambda(&client, &lambda, &mut direct, None).unwrap();
    transposed.apply_indexed_lambda(&client, &lambda, &mut resolved, None).unwrap();

    assert_eq!(read::<f32>(&client, &direct), read::<f32>(&client, &resolved));
}

#[test]
fn test_pairwise_equivalence() {
    let client = client();
    let (contiguous, transposed) = both_layouts(&client);
    let mut direct = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);
    let mut resolved = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);

    let lambda = Lambda::<Add>::new();
    contiguous
        .apply_pairwise_lambda(&client, &lambda, &contiguous, &mut direct, None)
        .unwrap();
    contiguous
        .apply_pairwise_lambda(&client, &lambda, &transposed, &mut resolved, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &direct), read::<f32>(&client, &resolved));
}

#[test]
fn test_pairwise_scalar_equivalence() {
    let client = client();
    let (contiguous, transposed) = both_layouts(&client);
    let three = array(&client, &[1], &[3.0f32]);
    let mut direct = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);
    let mut resolved = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);

    let lambda = Lambda::<Add>::new();
    contiguous
        .apply_pairwise_lambda(&client, &lambda, &three, &mut direct, None)
        .unwrap();
    transposed
        .apply_pairwise_lambda(&client, &lambda, &three, &mut resolved, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &direct), read::<f32>(&client, &resolved));
    assert_eq!(read::<f32>(&client, &direct), vec![3.0, 5.0, 7.0, 4.0, 6.0, 8.0]);
}

#[test]
fn test_indexed_pairwise_equivalence() {
    let client = client();
    let (contiguous, transposed) = both_layouts(&client);
    let mut direct = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);
    let mut resolved = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);

    let lambda = Lambda::<IndexedAdd>::new();
    contiguous
        .apply_indexed_pairwise_lambda(&client, &lambda, &contiguous, &mut direct, None)
        .unwrap();
    transposed
        .apply_indexed_pairwise_lambda(&client, &lambda, &transposed, &mut resolved, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &direct), read::<f32>(&client, &resolved));
}

#[test]
fn test_triplewise_equivalence() {
    let client = client();
    let (contiguous, transposed) = both_layouts(&client);
    let mut direct = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);
    let mut resolved = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);

    let lambda = Lambda::<Sum3>::new();
    contiguous
        .apply_triplewise_lambda(&client, &lambda, &contiguous, &contiguous, &mut direct, None)
        .unwrap();
    transposed
        .apply_triplewise_lambda(&client, &lambda, &contiguous, &transposed, &mut resolved, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &direct), read::<f32>(&client, &resolved));
}

#[test]
fn test_triplewise_unit_stride_takes_direct_path() {
    let client = client();
    let w = array(&client, &[4], &[1i32, 2, 3, 4]);

    assert_eq!(
        Addressing::detect(&[w.layout(), w.layout(), w.layout(), w.layout()]),
        Addressing::Direct
    );

    let mut z = LambdaArray::<R>::zeros(&client, &[4], DType::I32);
    w.apply_triplewise_lambda(&client, &Lambda::<Sum3>::new(), &w, &w, &mut z, None)
        .unwrap();
    assert_eq!(read::<i32>(&client, &z), vec![3, 6, 9, 12]);
}

#[test]
fn test_uniform_stride_view() {
    let client = client();
    let buffer = array(&client, &[8], &[0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    let even = buffer.view(&[4], &[2]).unwrap();
    assert_eq!(even.layout().effective_stride(), 2);

    let mut z = LambdaArray::<R>::zeros(&client, &[4], DType::F32);
    even.apply_lambda(&client, &Lambda::<Scale>::with_args([0.5]), &mut z, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &z), vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_column_major_source() {
    let client = client();
    // Logical [[1, 2, 3], [4, 5, 6]] stored column by column.
    let x = LambdaArray::<R>::from_data_with_order(
        &client,
        &[2, 3],
        Order::F,
        &[1i32, 4, 2, 5, 3, 6],
    )
    .unwrap();
    let mut z = LambdaArray::<R>::zeros(&client, &[2, 3], DType::I32);

    x.apply_lambda(&client, &Lambda::<Square>::new(), &mut z, None)
        .unwrap();

    assert_eq!(read::<i32>(&client, &z), vec![1, 4, 9, 16, 25, 36]);
}

#[test]
fn test_broadcast_stride_source() {
    let client = client();
    let row = array(&client, &[3], &[1.0f32, 2.0, 3.0]);
    let rows = row.view(&[2, 3], &[0, 1]).unwrap();
    let mut z = LambdaArray::<R>::zeros(&client, &[2, 3], DType::F32);

    rows.apply_lambda(&client, &Lambda::<Scale>::with_args([2.0]), &mut z, None)
        .unwrap();

    assert_eq!(read::<f32>(&client, &z), vec![2.0, 4.0, 6.0, 2.0, 4.0, 6.0]);
}
