//! NumPy `.npy` array dumps of `f64` matrices.
//!
//! Reads format versions 1.0 and 2.0 of little-endian `<f8` arrays in either order.
//! Writes version 1.0 in Fortran order, which is the storage order of [`Mat`].

use anyhow::{bail, ensure, Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use svdsteg::prelude::*;

const MAGIC: &[u8] = b"\x93NUMPY";
const ALIGN: usize = 64;

struct Header
{
    fortran_order: bool,
    shape: Vec<usize>,
}

fn dict_value<'a>(dict: &'a str, key: &str) -> Result<&'a str>
{
    let key = format!("'{}':", key);
    let pos = dict.find(&key).with_context(|| format!("no {} in header", key))?;
    Ok(dict[pos + key.len() ..].trim_start())
}

fn parse_header(dict: &str) -> Result<Header>
{
    let descr = dict_value(dict, "descr")?;
    ensure!(descr.starts_with("'<f8'"), "unsupported dtype: {}", descr);

    let fortran = dict_value(dict, "fortran_order")?;
    let fortran_order = if fortran.starts_with("True") {
        true
    }
    else if fortran.starts_with("False") {
        false
    }
    else {
        bail!("bad fortran_order: {}", fortran);
    };

    let shape = dict_value(dict, "shape")?;
    ensure!(shape.starts_with('('), "bad shape: {}", shape);
    let end = shape.find(')').context("unterminated shape")?;
    let shape = shape[1 .. end].split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<usize>().with_context(|| format!("bad dimension: {}", s)))
                .collect::<Result<Vec<_>>>()?;

    Ok(Header {fortran_order, shape})
}

/// Reads a `.npy` stream into a matrix.
///
/// Returns the matrix, or an error wrapping [`SvdError::Shape`] if the array is not 2-dimensional.
pub fn read_npy<R: Read>(mut rd: R) -> Result<Mat<f64>>
{
    let mut magic = [0u8; 6];
    rd.read_exact(&mut magic)?;
    ensure!(magic == MAGIC, "not a .npy stream");

    let mut version = [0u8; 2];
    rd.read_exact(&mut version)?;
    let header_len = match version[0] {
        1 => {
            let mut len = [0u8; 2];
            rd.read_exact(&mut len)?;
            u16::from_le_bytes(len) as usize
        },
        2 => {
            let mut len = [0u8; 4];
            rd.read_exact(&mut len)?;
            u32::from_le_bytes(len) as usize
        },
        v => bail!("unsupported .npy version {}.{}", v, version[1]),
    };

    let mut dict = vec![0u8; header_len];
    rd.read_exact(&mut dict)?;
    let dict = String::from_utf8(dict).context("header is not utf-8")?;
    let header = parse_header(&dict)?;
    log::debug!("npy shape {:?} fortran_order {}", header.shape, header.fortran_order);

    let n_bytes = header.shape.iter()
                  .try_fold(8usize, |acc, d| acc.checked_mul(*d))
                  .with_context(|| format!("shape {:?} too large", header.shape))?;
    let mut bytes = vec![0u8; n_bytes];
    rd.read_exact(&mut bytes).context("truncated array data")?;

    let array = bytes.chunks_exact(8)
                .map(|b| {
                    let mut le = [0u8; 8];
                    le.copy_from_slice(b);
                    f64::from_le_bytes(le)
                })
                .collect();

    let mat = Mat::from_shape_vec(&header.shape, array, header.fortran_order)?;
    Ok(mat)
}

/// Writes a matrix as a `.npy` stream.
pub fn write_npy<W: Write>(mut wr: W, mat: &Mat<f64>) -> Result<()>
{
    let (nrows, ncols) = mat.size();
    let mut dict = format!("{{'descr': '<f8', 'fortran_order': True, 'shape': ({}, {}), }}", nrows, ncols);

    // magic, version and length precede the dictionary; a newline terminates it
    let pre = MAGIC.len() + 2 + 2;
    let pad = ALIGN - (pre + dict.len() + 1) % ALIGN;
    dict.extend(std::iter::repeat(' ').take(pad % ALIGN));
    dict.push('\n');
    ensure!(dict.len() <= u16::MAX as usize, "header too long");

    wr.write_all(MAGIC)?;
    wr.write_all(&[1, 0])?;
    wr.write_all(&(dict.len() as u16).to_le_bytes())?;
    wr.write_all(dict.as_bytes())?;
    for v in mat.as_slice() {
        wr.write_all(&v.to_le_bytes())?;
    }
    wr.flush()?;

    Ok(())
}

pub fn load_npy<P: AsRef<Path>>(path: P) -> Result<Mat<f64>>
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_npy(BufReader::new(file)).with_context(|| format!("failed to read {}", path.display()))
}

pub fn save_npy<P: AsRef<Path>>(path: P, mat: &Mat<f64>) -> Result<()>
{
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_npy(BufWriter::new(file), mat).with_context(|| format!("failed to write {}", path.display()))
}

/// Dumps a factorization as `U.npy`, `S.npy` and `VH.npy` into directory `dir`.
pub fn save_factorization<P: AsRef<Path>>(dir: P, fact: &Factorization<f64>) -> Result<()>
{
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    save_npy(dir.join("U.npy"), fact.u())?;
    save_npy(dir.join("S.npy"), fact.s())?;
    save_npy(dir.join("VH.npy"), fact.vh())?;

    Ok(())
}

/// Loads a factorization dumped by [`save_factorization`].
pub fn load_factorization<P: AsRef<Path>>(dir: P) -> Result<Factorization<f64>>
{
    let dir = dir.as_ref();

    let u = load_npy(dir.join("U.npy"))?;
    let s = load_npy(dir.join("S.npy"))?;
    let vh = load_npy(dir.join("VH.npy"))?;

    Ok(Factorization::from_parts(u, s, vh)?)
}

//

#[cfg(test)]
mod tests
{
    use super::*;
    use float_eq::assert_float_eq;

    fn npy_bytes(dict: &str, data: &[f64]) -> Vec<u8>
    {
        let mut b = Vec::new();
        b.extend_from_slice(MAGIC);
        b.extend_from_slice(&[1, 0]);
        b.extend_from_slice(&(dict.len() as u16).to_le_bytes());
        b.extend_from_slice(dict.as_bytes());
        for v in data {
            b.extend_from_slice(&v.to_le_bytes());
        }
        b
    }

    #[test]
    fn test_read_c_order()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let b = npy_bytes("{'descr': '<f8', 'fortran_order': False, 'shape': (2, 3), }\n",
                          &[1., 2., 3., 4., 5., 6.]);
        let m = read_npy(b.as_slice()).unwrap();

        assert_eq!(m.size(), (2, 3));
        assert_float_eq!(m[(0, 2)], 3., abs <= 0.);
        assert_float_eq!(m[(1, 0)], 4., abs <= 0.);
    }

    #[test]
    fn test_write_read()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let m = Mat::new(3, 2).set_iter(&[
            1.5, -2.,
            0., 1e-300,
            7., 8.25
        ]);

        let mut b = Vec::new();
        write_npy(&mut b, &m).unwrap();

        assert_eq!(&b[.. 6], MAGIC);
        let header_len = u16::from_le_bytes([b[8], b[9]]) as usize;
        assert_eq!((10 + header_len) % ALIGN, 0);
        assert_eq!(b[9 + header_len], b'\n');
        assert_eq!(b.len(), 10 + header_len + 6 * 8);

        let r = read_npy(b.as_slice()).unwrap();
        assert_eq!(r, m);
    }

    #[test]
    fn test_not_2d()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let b = npy_bytes("{'descr': '<f8', 'fortran_order': False, 'shape': (2, 1, 2), }\n",
                          &[1., 2., 3., 4.]);
        let e = read_npy(b.as_slice()).unwrap_err();
        assert_eq!(e.downcast_ref::<SvdError>(), Some(&SvdError::Shape(vec![2, 1, 2])));

        let b = npy_bytes("{'descr': '<f8', 'fortran_order': False, 'shape': (3,), }\n",
                          &[1., 2., 3.]);
        let e = read_npy(b.as_slice()).unwrap_err();
        assert_eq!(e.downcast_ref::<SvdError>(), Some(&SvdError::Shape(vec![3])));
    }

    #[test]
    fn test_shape_overflow()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let dict = format!("{{'descr': '<f8', 'fortran_order': False, 'shape': ({}, 3), }}\n", usize::MAX / 2);
        let b = npy_bytes(&dict, &[0.]);
        let e = read_npy(b.as_slice()).unwrap_err();
        assert!(e.to_string().contains("too large"));
    }

    #[test]
    fn test_bad_dtype()
    {
        let b = npy_bytes("{'descr': '<i4', 'fortran_order': False, 'shape': (1, 1), }\n",
                          &[0.]);
        assert!(read_npy(b.as_slice()).is_err());
    }
}
