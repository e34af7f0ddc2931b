use std::fmt::Write as _;

use crate::mesh::GridMesh;

/// Hook notified once per successful build.
///
/// Diagnostics live here instead of inside the generation loops, so building
/// costs the same whether anyone is watching or not.
pub trait MeshObserver {
    fn on_built(&mut self, mesh: &GridMesh);
}

impl<F> MeshObserver for F
where
    F: FnMut(&GridMesh),
{
    fn on_built(&mut self, mesh: &GridMesh) {
        self(mesh)
    }
}

/// Dumps the vertex table (one line per column) and the index list through `log`.
#[derive(Debug, Copy, Clone)]
pub struct LogObserver {
    pub level: log::Level,
}

impl Default for LogObserver {
    fn default() -> Self {
        Self {
            level: log::Level::Debug,
        }
    }
}

impl MeshObserver for LogObserver {
    fn on_built(&mut self, mesh: &GridMesh) {
        let dims = mesh.dims();
        log::log!(
            self.level,
            "grid {}x{}: {} vertices, {} indices",
            dims.rows(),
            dims.cols(),
            mesh.vertex_count(),
            mesh.index_count()
        );

        if !log::log_enabled!(self.level) {
            return;
        }

        for line in vertex_table(mesh) {
            log::log!(self.level, "{line}");
        }
        log::log!(self.level, "{}", index_list(mesh));
    }
}

/// Formats vertex positions as `(x,y)` pairs, one string per column.
pub fn vertex_table(mesh: &GridMesh) -> Vec<String> {
    let dims = mesh.dims();
    (0..=dims.cols())
        .map(|col| {
            let mut line = String::new();
            for row in 0..=dims.rows() {
                let p = mesh.vertices()[mesh.address(col, row) as usize].position;
                let _ = write!(line, "({:5.2},{:5.2})", p[0], p[1]);
            }
            line
        })
        .collect()
}

/// Formats the index buffer as space-separated integers.
pub fn index_list(mesh: &GridMesh) -> String {
    mesh.indices()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;

    #[test]
    fn table_for_single_cell() {
        let mesh = build(1, 1).unwrap();
        assert_eq!(
            vertex_table(&mesh),
            vec![
                "(-1.00,-1.00)(-1.00, 1.00)".to_string(),
                "( 1.00,-1.00)( 1.00, 1.00)".to_string(),
            ]
        );
        assert_eq!(index_list(&mesh), "0 2 1 3");
    }
}
