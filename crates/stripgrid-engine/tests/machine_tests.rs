//! Mode transitions and mesh rebuilds on the mode machine.

use std::cell::Cell;
use std::rc::Rc;

use stripgrid_engine::render::backend::{BackendCall, RecordingBackend};
use stripgrid_engine::render::grid::{ModeMachine, RenderMode};
use stripgrid_mesh::{build, GridDimensions, GridMesh, MeshError};

fn machine(rows: u32, cols: u32, mode: RenderMode) -> ModeMachine {
    ModeMachine::new(build(rows, cols).unwrap(), mode)
}

fn lifecycle(calls: &[BackendCall]) -> Vec<BackendCall> {
    calls
        .iter()
        .filter(|c| {
            matches!(
                c,
                BackendCall::EnableClientArrays
                    | BackendCall::DisableClientArrays
                    | BackendCall::UploadResident { .. }
                    | BackendCall::ReleaseResident
            )
        })
        .cloned()
        .collect()
}

#[test]
fn starts_inactive_and_enters_on_first_draw() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(2, 2, RenderMode::VertexBufferObject);
    assert!(!m.is_active());
    assert!(backend.calls.is_empty());

    m.draw(&mut backend);
    assert!(m.is_active());
    assert!(matches!(
        backend.calls.first(),
        Some(BackendCall::UploadResident { .. })
    ));

    m.draw(&mut backend);
    assert_eq!(lifecycle(&backend.calls).len(), 1);
}

#[test]
fn cycle_visits_all_modes_and_wraps() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(1, 1, RenderMode::Immediate);

    let seen: Vec<_> = (0..RenderMode::ALL.len())
        .map(|_| m.cycle(&mut backend))
        .collect();
    assert_eq!(
        seen,
        vec![
            RenderMode::CachedVertices,
            RenderMode::CachedVertexIndices,
            RenderMode::VertexArray,
            RenderMode::VertexBufferObject,
            RenderMode::Immediate,
        ]
    );
    assert_eq!(m.mode(), RenderMode::Immediate);
}

#[test]
fn exit_precedes_enter_on_every_transition() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(2, 3, RenderMode::VertexArray);
    m.draw(&mut backend);

    m.set_mode(RenderMode::VertexBufferObject, &mut backend);
    m.set_mode(RenderMode::VertexArray, &mut backend);

    assert_eq!(
        lifecycle(&backend.calls),
        vec![
            BackendCall::EnableClientArrays,
            BackendCall::DisableClientArrays,
            BackendCall::UploadResident {
                vertices: 12,
                indices: 18
            },
            BackendCall::ReleaseResident,
            BackendCall::EnableClientArrays,
        ]
    );
}

#[test]
fn set_mode_to_current_is_noop() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(2, 2, RenderMode::VertexBufferObject);
    m.draw(&mut backend);
    backend.take_calls();

    assert!(!m.set_mode(RenderMode::VertexBufferObject, &mut backend));
    assert!(backend.calls.is_empty());
}

#[test]
fn inactive_transition_does_not_enter() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(2, 2, RenderMode::Immediate);
    assert!(m.set_mode(RenderMode::VertexBufferObject, &mut backend));
    assert!(backend.calls.is_empty());
    assert!(!m.is_active());
}

#[test]
fn resize_reuploads_resident_buffers() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(2, 2, RenderMode::VertexBufferObject);
    m.draw(&mut backend);

    m.rebuild(3, 1, &mut backend).unwrap();
    assert_eq!(m.dims(), GridDimensions::new(3, 1).unwrap());

    assert_eq!(
        lifecycle(&backend.calls),
        vec![
            BackendCall::UploadResident {
                vertices: 9,
                indices: 12
            },
            BackendCall::ReleaseResident,
            BackendCall::UploadResident {
                vertices: 8,
                indices: 8
            },
        ]
    );
    let (vertices, _) = backend.resident.clone().unwrap();
    assert_eq!(vertices.len(), 8);
}

#[test]
fn invalid_rebuild_leaves_machine_untouched() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(2, 2, RenderMode::VertexBufferObject);
    m.draw(&mut backend);
    backend.take_calls();

    let before: GridMesh = m.mesh().clone();
    let err = m.rebuild(0, 4, &mut backend).unwrap_err();

    assert_eq!(err, MeshError::InvalidDimensions { rows: 0, cols: 4 });
    assert_eq!(m.mesh(), &before);
    assert_eq!(m.mode(), RenderMode::VertexBufferObject);
    assert!(m.is_active());
    assert!(backend.calls.is_empty());
    assert!(backend.resident.is_some());
}

#[test]
fn resize_to_same_dims_is_noop() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(2, 2, RenderMode::VertexArray);
    m.draw(&mut backend);
    backend.take_calls();

    m.rebuild(2, 2, &mut backend).unwrap();
    assert!(backend.calls.is_empty());
}

#[test]
fn resize_notifies_observer() {
    let builds = Rc::new(Cell::new(0));
    let seen = Rc::clone(&builds);

    let mut backend = RecordingBackend::new();
    let mut m = machine(1, 1, RenderMode::Immediate)
        .with_observer(Box::new(move |_: &GridMesh| seen.set(seen.get() + 1)));

    m.rebuild(2, 2, &mut backend).unwrap();
    m.rebuild(2, 3, &mut backend).unwrap();
    assert!(m.rebuild(0, 3, &mut backend).is_err());
    assert_eq!(builds.get(), 2);
}

#[test]
fn deactivate_releases_held_resources() {
    let mut backend = RecordingBackend::new();
    let mut m = machine(2, 2, RenderMode::VertexBufferObject);
    m.draw(&mut backend);
    m.deactivate(&mut backend);
    m.deactivate(&mut backend);

    assert!(backend.resident.is_none());
    assert_eq!(
        lifecycle(&backend.calls)
            .iter()
            .filter(|c| **c == BackendCall::ReleaseResident)
            .count(),
        1
    );
}
