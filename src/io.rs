//! Reading and writing graphs in the [text format](crate::parse), plain or gzipped.
use std::ffi::OsStr;
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use itertools::Itertools;

use crate::error::LoadError;
use crate::graph::*;
use crate::iterators::*;
use crate::labelgraph::LabelGraph;
use crate::parse::parse_reader;

pub trait WriteToFile {
    fn write_txt(&self, filename:&str) -> io::Result<()> {
        let file = File::create(filename)?;
        let buf = BufWriter::new(file);
        self.write_buf(Box::new(buf))
    }

    fn write_gzipped(&self, filename:&str) -> io::Result<()> {
        let file = File::create(filename)?;
        let gz = GzEncoder::new(file, Compression::default());
        let buf = BufWriter::new(gz);
        self.write_buf(Box::new(buf))
    }

    fn write_buf(&self, buf:Box<dyn Write>) -> io::Result<()>;
}

pub trait LoadFromFile {
    fn from_txt(filename:&str) -> Result<Self, LoadError> where Self: Sized {
        let buf = open_reader_txt(filename)?;
        Self::from_buf(buf)
    }

    fn from_gzipped(filename:&str) -> Result<Self, LoadError> where Self: Sized {
        let buf = open_reader_gzip(filename)?;
        Self::from_buf(buf)
    }

    /// Picks plain or gzipped reading based on the file extension.
    fn from_file(filename:&str) -> Result<Self, LoadError> where Self: Sized {
        let buf = open_reader(filename)?;
        Self::from_buf(buf)
    }

    fn from_buf(buf:Box<dyn BufRead>) -> Result<Self, LoadError> where Self: Sized;
}

/// I/O operations for [LabelGraph] defined in [crate::io]
impl LoadFromFile for LabelGraph<String> {
    /// Loads the graph from text, see [crate::parse] for the format.
    ///
    /// For example, assume the file `films.txt` contains the following:
    /// ```text
    /// [vertices]
    /// ana type=user
    /// [edges]
    /// ana matrix
    /// ana x up
    /// ```
    /// We can then load the file as follows:
    ///
    /// ```rust,no_run
    /// use bicolour::graph::*;
    /// use bicolour::io::*;
    /// use bicolour::labelgraph::LabelGraph;
    ///
    /// let graph = LabelGraph::from_txt("films.txt").expect("Could not open films.txt");
    /// println!("Vertices: {:?}", graph.vertices().collect::<Vec<_>>());
    /// ```
    fn from_buf(buf:Box<dyn BufRead>) -> Result<Self, LoadError> where Self: Sized {
        parse_reader(buf)
    }
}

/// Writes the graph in the text format. Vertices carrying metadata and isolated
/// vertices are listed in a `[vertices]` section, attributes sorted by key. Graphs
/// without either are written as a plain edge list.
impl<V> WriteToFile for LabelGraph<V> where V: VertexId + Display {
    fn write_buf(&self, mut buf:Box<dyn Write>) -> io::Result<()> {
        let listed:Vec<&V> = self.vertices()
            .filter(|v| self.degree(v) == 0 || self.vertex_data(v).is_some_and(|d| !d.is_empty()))
            .collect();

        if !listed.is_empty() {
            writeln!(buf, "[vertices]")?;
            for v in listed {
                write!(buf, "{v}")?;
                if let Some(data) = self.vertex_data(v) {
                    if let Some(p) = data.position {
                        write!(buf, " pos={},{}", p.x, p.y)?;
                    }
                    for (key, value) in data.attributes.iter().sorted() {
                        write!(buf, " {key}={value}")?;
                    }
                }
                writeln!(buf)?;
            }
            writeln!(buf, "[edges]")?;
        }

        for (u,v) in self.edges() {
            writeln!(buf, "{u} {v}")?;
        }
        buf.flush()?;

        Ok(())
    }
}

fn open_reader(filename:&str) -> Result<Box<dyn BufRead>, LoadError> {
    let path = Path::new(&filename);
    let extension = path.extension().and_then(OsStr::to_str);
    let reader:Box<dyn BufRead> = match extension {
        Some("txt") => {
            let file = File::open(path)?;
            Box::new(BufReader::new(file))
        }
        Some("gz") => {
            let file = File::open(path)?;
            let gz = GzDecoder::new(file);
            Box::new(BufReader::new(gz))
        }
        _ => return Err(LoadError::UnsupportedFormat(filename.to_string()))
    };
    Ok(reader)
}

fn open_reader_txt(filename:&str) -> io::Result<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    let file = File::open(path)?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_reader_gzip(filename:&str) -> io::Result<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    let file = File::open(path)?;
    let gz = GzDecoder::new(file);
    Ok(Box::new(BufReader::new(gz)))
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####

#[cfg(test)]
mod test {
    use super::*;
    use crate::labelgraph::{Position, VertexData};

    fn s(v:&str) -> String {
        v.to_string()
    }

    #[test]
    fn read_graph() {
        let G = LabelGraph::from_gzipped("resources/films.txt.gz").unwrap();

        assert_eq!(G.num_vertices(), 6);
        assert_eq!(G.num_edges(), 6);
        assert_eq!(G.position(&s("ana")), Some(Position::new(0.15, 0.85)));
        assert_eq!(G.position(&s("up")), Some(Position::new(0.8, 0.15)));

        let H = LabelGraph::from_txt("resources/films.txt").unwrap();
        assert_eq!(G, H);

        let H = LabelGraph::from_file("resources/films.txt.gz").unwrap();
        assert_eq!(G, H);
    }

    #[test]
    fn read_legacy_edge_list() {
        let G = LabelGraph::from_file("resources/bipartite.txt").unwrap();

        assert!(G.adjacent(&s("u"), &s("v")));
        assert_eq!(G.positions().count(), 0);
    }

    #[test]
    fn unsupported_and_missing_files() {
        assert!(matches!(LabelGraph::from_file("resources/films.csv"),
                         Err(LoadError::UnsupportedFormat(_))));
        assert!(matches!(LabelGraph::from_txt("resources/does-not-exist.txt"),
                         Err(LoadError::Io(_))));

        let err = LabelGraph::from_file("resources/films.csv").unwrap_err();
        assert!(err.to_string().contains("`.txt` and `.gz`"), "{}", err);
    }

    #[test]
    fn any_gz_extension_is_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("films.gz");
        let path = path.to_str().unwrap();

        let G = LabelGraph::from_txt("resources/films.txt").unwrap();
        G.write_gzipped(path).unwrap();

        assert_eq!(LabelGraph::from_file(path).unwrap(), G);
    }

    #[test]
    fn write_graph() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("graph.txt");
        let gz = dir.path().join("graph.txt.gz");
        let txt = txt.to_str().unwrap();
        let gz = gz.to_str().unwrap();

        let mut G:LabelGraph<String> = LabelGraph::new();
        G.add_edge(&s("a"), &s("b"));
        G.add_edge(&s("b"), &s("c"));
        G.add_vertex(&s("isolated"));
        G.add_vertex_with(&s("a"), VertexData::new().with_position(1.5, -2.0).with_attribute("type", "user"));

        G.write_txt(txt).unwrap();
        G.write_gzipped(gz).unwrap();

        let H1 = LabelGraph::from_txt(txt).unwrap();
        let H2 = LabelGraph::from_gzipped(gz).unwrap();

        assert_eq!(G, H1);
        assert_eq!(H1, H2);
    }

    #[test]
    fn write_plain_edge_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cycle.txt");
        let path = path.to_str().unwrap();

        LabelGraph::cycle(3).write_txt(path).unwrap();
        let written = std::fs::read_to_string(path).unwrap();

        assert_eq!(written, "0 1\n0 2\n1 2\n");
    }
}
